//! Catalog browsing commands.

use std::fmt::Write as _;

use ebooks_storefront::state::AppState;
use ebooks_storefront::storage::KeyValueStore;

/// Print books in `category` (`"All"` for every book).
#[allow(clippy::print_stdout)]
pub fn list<S: KeyValueStore>(state: &AppState<S>, category: &str) {
    print!("{}", render_list(state, category));
}

/// Print the category filter options.
#[allow(clippy::print_stdout)]
pub fn categories<S: KeyValueStore>(state: &AppState<S>) {
    for category in state.catalog().categories() {
        println!("{category}");
    }
}

pub fn render_list<S: KeyValueStore>(state: &AppState<S>, category: &str) -> String {
    let books = state.catalog().by_category(category);
    if books.is_empty() {
        return format!("No books in category {category:?}\n");
    }

    let mut out = String::new();
    for book in books {
        let _ = writeln!(
            out,
            "[{}] {} - {} ({} pages, {})",
            book.id,
            book.title,
            state.price(book.price),
            book.pages,
            book.category
        );
    }
    out
}
