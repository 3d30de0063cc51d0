use shelf_core::types::{NewReview, Rating, ReviewText};
use shelf_storage::{reviews, StorageError};

use test_helpers::{create_test_book, create_test_user, TestDb};

fn new_review(book_id: i64, user_id: i64, text: &str, rating: u8) -> NewReview {
    NewReview {
        book_id,
        user_id,
        review: ReviewText::parse(text).unwrap(),
        rating: Rating::try_from(rating).unwrap(),
    }
}

#[tokio::test]
async fn test_create_review_and_list_with_author() {
    let db = TestDb::new().await;
    let user_id = create_test_user(db.pool(), "Alice", "alice@example.com").await;
    let book_id = create_test_book(db.pool(), "0000000001", "Test Book", "Test Author", 2000).await;

    assert!(!reviews::exists_for(db.pool(), book_id, user_id).await.unwrap());

    let review = reviews::create(
        db.pool(),
        new_review(book_id, user_id, "A thoroughly enjoyable read.", 4),
    )
    .await
    .unwrap();
    assert_eq!(review.rating.value(), 4);

    assert!(reviews::exists_for(db.pool(), book_id, user_id).await.unwrap());

    let listed = reviews::for_book(db.pool(), book_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author_name, "Alice");
    assert_eq!(listed[0].review, review);
}

#[tokio::test]
async fn test_second_review_for_same_pair_is_duplicate() {
    let db = TestDb::new().await;
    let user_id = create_test_user(db.pool(), "Alice", "alice@example.com").await;
    let book_id = create_test_book(db.pool(), "0000000001", "Test Book", "Test Author", 2000).await;

    reviews::create(db.pool(), new_review(book_id, user_id, "First impressions are good.", 5))
        .await
        .unwrap();

    let err = reviews::create(
        db.pool(),
        new_review(book_id, user_id, "Changed my mind about this.", 1),
    )
    .await
    .unwrap_err();
    assert!(err.is_duplicate(), "unexpected error: {err:?}");

    let listed = reviews::for_book(db.pool(), book_id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_reviews_are_scoped_per_book_and_user() {
    let db = TestDb::new().await;
    let alice = create_test_user(db.pool(), "Alice", "alice@example.com").await;
    let bob = create_test_user(db.pool(), "Bob", "bob@example.com").await;
    let first = create_test_book(db.pool(), "0000000001", "First", "Author", 2000).await;
    let second = create_test_book(db.pool(), "0000000002", "Second", "Author", 2001).await;

    reviews::create(db.pool(), new_review(first, alice, "Alice liked the first one.", 5))
        .await
        .unwrap();
    reviews::create(db.pool(), new_review(first, bob, "Bob was less impressed here.", 2))
        .await
        .unwrap();
    reviews::create(db.pool(), new_review(second, alice, "Alice on the second volume.", 3))
        .await
        .unwrap();

    assert_eq!(reviews::for_book(db.pool(), first).await.unwrap().len(), 2);
    assert_eq!(reviews::for_book(db.pool(), second).await.unwrap().len(), 1);
    assert!(!reviews::exists_for(db.pool(), second, bob).await.unwrap());
}

#[tokio::test]
async fn test_review_for_unknown_book_rejected() {
    let db = TestDb::new().await;
    let user_id = create_test_user(db.pool(), "Alice", "alice@example.com").await;

    let err = reviews::create(db.pool(), new_review(404, user_id, "Reviewing thin air here.", 3))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Database(_)));
}
