//! User-facing messages shown alongside rendered pages

pub const NOT_LOGGED_IN: &str = "Please log in to continue";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGGED_OUT: &str = "You have been logged out";

pub const CREATE_ACCOUNT_PROMPT: &str = "Fill in the form below to create an account";
pub const EMPTY_ACCOUNT_FIELDS: &str = "Name, email and password cannot be empty";
pub const PASSWORD_MISMATCH: &str = "Password and confirmation mismatch";
pub const EMAIL_ALREADY_PRESENT: &str = "Email already present";
pub const ACCOUNT_CREATED: &str = "Account created, you can now log in";

pub const EMPTY_CRITERIA: &str = "Search criteria cannot be empty";

pub const REVIEW_ALREADY_SUBMITTED: &str = "You have already reviewed this book";
pub const REVIEW_SAVED: &str = "Thank you, your review has been saved";

/// Shown when a write fails for reasons other than validation
pub const TRY_AGAIN_LATER: &str = "Something went wrong, please try again later";

pub fn welcome(name: &str) -> String {
    format!("Welcome, {name}")
}

pub fn nothing_found_for_isbn(isbn: &str) -> String {
    format!("Nothing found for isbn '{isbn}'")
}
