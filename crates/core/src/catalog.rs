//! The book catalog.
//!
//! The catalog is a fixed, read-only list of books. The cart never holds a
//! reference into it: adding a book copies its fields into a line item, so a
//! later catalog edit does not change what is already in a cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::BookId;

/// Category name that matches every book.
pub const ALL_CATEGORIES: &str = "All";

/// A book offered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub price: Decimal,
    pub cover: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub full_description: String,
    pub pages: u32,
    pub category: String,
}

/// An ordered, read-only collection of books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Create a catalog from a list of books, keeping their order.
    #[must_use]
    pub const fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// The store's built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let books = BUILTIN_BOOKS
            .iter()
            .map(|entry| Book {
                id: BookId::new(entry.id),
                title: entry.title.to_owned(),
                price: Decimal::new(entry.price_cents, 2),
                cover: cover_path(entry.cover),
                images: (1..=5).map(cover_path).collect(),
                full_description: entry.description.to_owned(),
                pages: entry.pages,
                category: entry.category.to_owned(),
            })
            .collect();
        Self::new(books)
    }

    /// All books in catalog order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a book by ID.
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Category filter options: `"All"` followed by each distinct category in
    /// first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for book in &self.books {
            if !categories.contains(&book.category.as_str()) {
                categories.push(&book.category);
            }
        }
        categories
    }

    /// Books in the given category. `"All"` returns the full catalog.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Book> {
        if category == ALL_CATEGORIES {
            return self.books.iter().collect();
        }
        self.books
            .iter()
            .filter(|book| book.category == category)
            .collect()
    }

    /// Number of books in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

fn cover_path(n: u8) -> String {
    format!("/assets/eng-cover-color-{n}.png")
}

struct BuiltinBook {
    id: i32,
    title: &'static str,
    price_cents: i64,
    cover: u8,
    description: &'static str,
    pages: u32,
    category: &'static str,
}

const BUILTIN_BOOKS: &[BuiltinBook] = &[
    BuiltinBook {
        id: 1,
        title: "The Art of Programming",
        price_cents: 2999,
        cover: 1,
        description: "This comprehensive guide takes you through the fundamentals of modern programming.",
        pages: 120,
        category: "Calenders",
    },
    BuiltinBook {
        id: 2,
        title: "Digital Marketing Mastery",
        price_cents: 2499,
        cover: 2,
        description: "Unlock the secrets of successful digital marketing with this comprehensive guide. \
            Learn how to create compelling campaigns, leverage social media platforms, optimize for \
            search engines, and measure your marketing ROI. This book includes case studies, practical \
            exercises, and actionable insights from industry experts.",
        pages: 320,
        category: "Business",
    },
    BuiltinBook {
        id: 3,
        title: "Mindful Living",
        price_cents: 1999,
        cover: 3,
        description: "Discover the transformative power of mindfulness in this practical guide to \
            conscious living. Dr. Emily Chen shares evidence-based techniques for reducing stress, \
            improving focus, and finding inner peace in our fast-paced world. Includes guided \
            meditations, daily practices, and scientific insights into the benefits of mindfulness.",
        pages: 280,
        category: "Self-Help",
    },
    BuiltinBook {
        id: 4,
        title: "The Future of AI",
        price_cents: 3499,
        cover: 4,
        description: "Delve into the fascinating world of artificial intelligence and its \
            transformative potential. This book examines current AI technologies, future \
            possibilities, ethical considerations, and the impact on various industries. Written by a \
            leading AI researcher, it provides both technical insights and accessible explanations \
            for general readers.",
        pages: 380,
        category: "Technology",
    },
    BuiltinBook {
        id: 5,
        title: "Creative Writing Workshop",
        price_cents: 2299,
        cover: 5,
        description: "Whether you're a beginner or an experienced writer, this workshop-style book \
            will help you develop your creative writing skills. Featuring writing prompts, character \
            development exercises, plot structure guidance, and tips for overcoming writer's block. \
            Includes examples from published authors and peer review strategies.",
        pages: 250,
        category: "Writing",
    },
    BuiltinBook {
        id: 6,
        title: "Sustainable Living Guide",
        price_cents: 1899,
        cover: 1,
        description: "Make a positive impact on the planet with this comprehensive guide to \
            sustainable living. Learn about eco-friendly practices for your home, work, and daily \
            life. Covers topics like renewable energy, waste reduction, sustainable food choices, and \
            green transportation options. Includes actionable tips and resources for creating \
            lasting change.",
        pages: 200,
        category: "Environment",
    },
];
