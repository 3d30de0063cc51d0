//! Book catalog queries

use crate::{Result, StorageError};
use shelf_core::types::{Book, BookId, NewBook};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};

fn book_from_row(row: &SqliteRow) -> Result<Book> {
    Ok(Book {
        id: row.try_get("id")?,
        isbn: row.try_get("isbn")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        year: row.try_get("year")?,
    })
}

/// Insert a book
///
/// Accepts any executor so the importer can batch inserts in one transaction.
/// Fails with [`StorageError::Duplicate`] when the ISBN already exists.
pub async fn create<'e, E>(executor: E, book: &NewBook) -> Result<BookId>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO books (isbn, title, author, year) VALUES (?, ?, ?, ?)")
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .execute(executor)
        .await
        .map_err(|e| StorageError::from_write(e, "book", || book.isbn.clone()))?;

    Ok(result.last_insert_rowid())
}

pub async fn get_by_id(pool: &SqlitePool, id: BookId) -> Result<Option<Book>> {
    let row = sqlx::query("SELECT id, isbn, title, author, year FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(book_from_row).transpose()
}

pub async fn find_by_isbn(pool: &SqlitePool, isbn: &str) -> Result<Option<Book>> {
    let row = sqlx::query("SELECT id, isbn, title, author, year FROM books WHERE isbn = ?")
        .bind(isbn)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(book_from_row).transpose()
}

/// Case-insensitive substring search over author, ISBN and title
///
/// `SQLite` `LIKE` folds ASCII case only.
pub async fn search(pool: &SqlitePool, criteria: &str) -> Result<Vec<Book>> {
    let pattern = like_pattern(criteria);

    let rows = sqlx::query(
        "SELECT id, isbn, title, author, year
         FROM books
         WHERE author LIKE ?1 ESCAPE '\\'
            OR isbn LIKE ?1 ESCAPE '\\'
            OR title LIKE ?1 ESCAPE '\\'
         ORDER BY title, id",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    rows.iter().map(book_from_row).collect()
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Wrap criteria in wildcards, escaping LIKE metacharacters so they match literally
fn like_pattern(criteria: &str) -> String {
    let mut pattern = String::with_capacity(criteria.len() + 2);
    pattern.push('%');
    for c in criteria.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
