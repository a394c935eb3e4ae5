pub mod author;
pub mod book;
pub mod book_authors;
pub mod book_categories;
pub mod category;
pub mod city;
pub mod neighborhood;
pub mod state;
pub mod user;
