//! HTML pages
//!
//! Every renderer returns a complete document. Text that came from a user or
//! from the catalog goes through [`escape`] before it is interpolated.

use crate::messages;
use shelf_core::{Book, BookRatings, Identity, Rating, ReviewWithAuthor, MIN_REVIEW_LENGTH};

/// Escape text for use in HTML content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, identity: Option<&Identity>, message: Option<&str>, body: &str) -> String {
    let nav = match identity {
        Some(identity) => format!(
            r#"<span class="user">Logged in as {}</span>
            <a href="/books">Search</a>
            <a href="/logout">Log out</a>"#,
            escape(&identity.name)
        ),
        None => r#"<a href="/">Log in</a>
            <a href="/create_account">Create account</a>"#
            .to_string(),
    };

    let message = message
        .map(|msg| format!(r#"<p class="message">{}</p>"#, escape(msg)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Shelf</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            max-width: 860px;
            margin: 0 auto;
            padding: 0 20px;
            line-height: 1.5;
        }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            border-bottom: 1px solid #ddd;
            margin-bottom: 20px;
        }}
        nav a, nav span {{
            margin-left: 12px;
        }}
        .message {{
            background-color: #eef4ff;
            border: 1px solid #bcd0f5;
            padding: 8px 12px;
        }}
        .review {{
            border-top: 1px solid #eee;
            padding: 8px 0;
        }}
        label {{
            display: block;
            margin-top: 8px;
        }}
    </style>
</head>
<body>
    <header>
        <h1><a href="/">Shelf</a></h1>
        <nav>{nav}</nav>
    </header>
    {message}
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn login_form() -> &'static str {
    r#"<form method="post" action="/login">
            <label>Email <input type="email" name="email" required></label>
            <label>Password <input type="password" name="password" required></label>
            <button type="submit">Log in</button>
        </form>
        <p>No account yet? <a href="/create_account">Create one</a>.</p>"#
}

fn search_form(criteria: &str) -> String {
    format!(
        r#"<form method="post" action="/books">
            <label>Title, author or ISBN
                <input type="text" name="criteria" value="{}">
            </label>
            <button type="submit">Search</button>
        </form>"#,
        escape(criteria)
    )
}

/// Landing page: login form for visitors, search form once logged in
pub fn index(identity: Option<&Identity>, message: Option<&str>) -> String {
    let body = match identity {
        Some(identity) => format!(
            "<h2>Hello, {}</h2>\n{}",
            escape(&identity.name),
            search_form("")
        ),
        None => format!("<h2>Log in</h2>\n{}", login_form()),
    };

    layout("Home", identity, message, &body)
}

/// Fixed page for handlers that need a logged-in user
pub fn not_logged_in() -> String {
    layout(
        "Log in",
        None,
        Some(messages::NOT_LOGGED_IN),
        &format!("<h2>Log in</h2>\n{}", login_form()),
    )
}

pub fn create_account(identity: Option<&Identity>, message: &str) -> String {
    let body = r#"<h2>Create account</h2>
        <form method="post" action="/create_account">
            <label>Name <input type="text" name="name"></label>
            <label>Email <input type="email" name="email"></label>
            <label>Password <input type="password" name="password"></label>
            <label>Confirm password <input type="password" name="password_check"></label>
            <button type="submit">Create account</button>
        </form>"#;

    layout("Create account", identity, Some(message), body)
}

/// Search form followed by the matching books, if a search ran
pub fn search(
    identity: &Identity,
    criteria: &str,
    results: Option<&[Book]>,
    message: Option<&str>,
) -> String {
    let mut body = format!("<h2>Search the catalog</h2>\n{}", search_form(criteria));

    if let Some(books) = results {
        body.push_str(&format!(
            r#"
        <p class="count">{} result(s) for "{}"</p>
        <ul class="results">"#,
            books.len(),
            escape(criteria)
        ));
        for book in books {
            body.push_str(&format!(
                r#"
            <li><a href="/viewbook/{}">{}</a> by {} ({}), ISBN {}</li>"#,
                book.id,
                escape(&book.title),
                escape(&book.author),
                book.year,
                escape(&book.isbn)
            ));
        }
        body.push_str("\n        </ul>");
    }

    layout("Search", Some(identity), message, &body)
}

/// Everything the book detail page shows
#[derive(Debug)]
pub struct BookPage<'a> {
    pub identity: &'a Identity,
    pub book: &'a Book,
    pub reviews: &'a [ReviewWithAuthor],
    pub ratings: BookRatings,
    pub already_reviewed: bool,
    pub message: Option<&'a str>,
}

pub fn book_detail(page: &BookPage<'_>) -> String {
    let book = page.book;
    let mut body = format!(
        r#"<h2>{title}</h2>
        <dl>
            <dt>Author</dt><dd>{author}</dd>
            <dt>Year</dt><dd>{year}</dd>
            <dt>ISBN</dt><dd>{isbn}</dd>
            <dt>External ratings</dt><dd>{count} ratings, average {average:.2}</dd>
        </dl>
        <h3>Reviews ({reviews})</h3>"#,
        title = escape(&book.title),
        author = escape(&book.author),
        year = book.year,
        isbn = escape(&book.isbn),
        count = page.ratings.review_count,
        average = page.ratings.average_score,
        reviews = page.reviews.len(),
    );

    if page.reviews.is_empty() {
        body.push_str("\n        <p>No reviews yet.</p>");
    }
    for entry in page.reviews {
        body.push_str(&format!(
            r#"
        <div class="review">
            <strong>{}</strong> rated it {}/{}
            <p>{}</p>
        </div>"#,
            escape(&entry.author_name),
            entry.review.rating,
            Rating::MAX,
            escape(&entry.review.review)
        ));
    }

    if page.already_reviewed {
        body.push_str("\n        <p>You have reviewed this book.</p>");
    } else {
        let options: String = Rating::all()
            .map(|rating| format!(r#"<option value="{rating}">{rating}</option>"#))
            .collect();
        body.push_str(&format!(
            r#"
        <h3>Write a review</h3>
        <form method="post" action="/add_review/{id}">
            <label>Review (at least {min} characters)
                <textarea name="review" rows="5" cols="60"></textarea>
            </label>
            <label>Rating <select name="rating">{options}</select></label>
            <button type="submit">Submit review</button>
        </form>"#,
            id = book.id,
            min = MIN_REVIEW_LENGTH,
        ));
    }

    layout(&book.title, Some(page.identity), page.message, &body)
}

pub fn book_not_found(identity: &Identity, book_id: &str) -> String {
    let body = format!(
        r#"<h2>Book not found</h2>
        <p>There is no book with id {}. <a href="/books">Back to search</a></p>"#,
        escape(book_id)
    );

    layout("Not found", Some(identity), None, &body)
}
