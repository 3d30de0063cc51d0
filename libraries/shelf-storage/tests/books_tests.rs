use shelf_core::types::NewBook;
use shelf_storage::{books, StorageError};

use test_helpers::{create_test_book, TestDb};

async fn seed_catalog(db: &TestDb) {
    create_test_book(
        db.pool(),
        "0380795272",
        "Krondor: The Betrayal",
        "Raymond E. Feist",
        1998,
    )
    .await;
    create_test_book(db.pool(), "1416949658", "The Dark Is Rising", "Susan Cooper", 1973).await;
    create_test_book(db.pool(), "0553803700", "I, Robot", "Isaac Asimov", 1950).await;
}

#[tokio::test]
async fn test_get_by_id_and_isbn() {
    let db = TestDb::new().await;
    let id = create_test_book(db.pool(), "0000000001", "Test Book", "Test Author", 2000).await;

    let book = books::get_by_id(db.pool(), id).await.unwrap().unwrap();
    assert_eq!(book.isbn, "0000000001");
    assert_eq!(book.year, 2000);

    let by_isbn = books::find_by_isbn(db.pool(), "0000000001").await.unwrap();
    assert_eq!(by_isbn, Some(book));

    assert!(books::get_by_id(db.pool(), id + 1).await.unwrap().is_none());
    assert!(books::find_by_isbn(db.pool(), "9999999999999")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_search_matches_title_author_and_isbn_case_insensitively() {
    let db = TestDb::new().await;
    seed_catalog(&db).await;

    let by_title = books::search(db.pool(), "dark is").await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "The Dark Is Rising");

    let by_author = books::search(db.pool(), "ASIMOV").await.unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].isbn, "0553803700");

    let by_isbn = books::search(db.pool(), "079527").await.unwrap();
    assert_eq!(by_isbn.len(), 1);
    assert_eq!(by_isbn[0].author, "Raymond E. Feist");

    // "r" appears in all three rows
    let broad = books::search(db.pool(), "r").await.unwrap();
    assert_eq!(broad.len(), 3);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = TestDb::new().await;
    seed_catalog(&db).await;
    create_test_book(db.pool(), "1111111111", "100% Pure", "Anon", 2010).await;

    let results = books::search(db.pool(), "%").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "100% Pure");

    assert!(books::search(db.pool(), "_").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_isbn_rejected() {
    let db = TestDb::new().await;
    create_test_book(db.pool(), "0000000001", "Test Book", "Test Author", 2000).await;

    let err = books::create(
        db.pool(),
        &NewBook {
            isbn: "0000000001".to_string(),
            title: "Another".to_string(),
            author: "Someone".to_string(),
            year: 2001,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, StorageError::Duplicate { .. }));
    assert_eq!(books::count(db.pool()).await.unwrap(), 1);
}
