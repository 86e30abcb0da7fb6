//! Fabricated records served in place of a store.

use time::OffsetDateTime;

use super::models::Book;

fn genres() -> Vec<String> {
    vec!["Fiction".to_string(), "Thriller".to_string()]
}

/// The two records returned by the list endpoint, in display order.
pub fn reading_list() -> Vec<Book> {
    let now = OffsetDateTime::now_utc();

    vec![
        Book {
            id: 1,
            created_at: now,
            title: "Thus spoke zarathustra".to_string(),
            published: 1912,
            pages: 300,
            genres: genres(),
            rating: None,
            version: 1,
        },
        Book {
            id: 2,
            created_at: now,
            title: "XD".to_string(),
            published: 2019,
            pages: 300,
            genres: genres(),
            rating: None,
            version: 1,
        },
    ]
}

/// A single record carrying the requested id.
pub fn book_with_id(id: i64) -> Book {
    Book {
        id,
        created_at: OffsetDateTime::now_utc(),
        title: "Echoes in the darkness".to_string(),
        published: 2019,
        pages: 300,
        genres: genres(),
        rating: Some(4.5),
        version: 1,
    }
}
