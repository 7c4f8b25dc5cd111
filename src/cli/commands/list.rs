//! List command - show books in the repository

use super::with_data_file;
use crate::app::open_store;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::BookstoreResult;
use crate::model::Book;
use crate::store::EntityStore;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> BookstoreResult<()> {
    let config = with_data_file(config, args.data_file);
    let books = open_store(&config).await?.read_all().await?;

    if books.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No books in the catalog");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&books),
        OutputFormat::Json => print_json(&books)?,
        OutputFormat::Plain => print_plain(&books),
    }

    Ok(())
}

fn print_table(books: &[Book]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Books");

    println!(
        "{:<38} {:<15} {:<24} {:<30}",
        style("ID").bold(),
        style("ISBN").bold(),
        style("AUTHOR").bold(),
        style("NAME").bold()
    );
    println!("{}", "-".repeat(110));

    for book in books {
        println!(
            "{:<38} {:<15} {:<24} {:<30}",
            book.id, book.isbn, book.author, book.name
        );
    }

    println!();
    println!("{} book(s)", books.len());
}

fn print_json(books: &[Book]) -> BookstoreResult<()> {
    let json = serde_json::to_string_pretty(books)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(books: &[Book]) {
    for book in books {
        println!("{}\t{}", book.id, book.name);
    }
}
