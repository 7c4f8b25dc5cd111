//! Import command - add books from a JSON file

use super::with_data_file;
use crate::app::open_store;
use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::error::{BookstoreError, BookstoreResult};
use crate::model::Book;
use crate::service::BookService;
use crate::ui::{self, UiContext};
use tokio::fs;

/// Execute the import command
pub async fn execute(args: ImportArgs, config: &Config) -> BookstoreResult<()> {
    let ctx = UiContext::detect();
    let config = with_data_file(config, args.data_file);

    let content = fs::read_to_string(&args.file)
        .await
        .map_err(|e| BookstoreError::io(format!("reading {}", args.file.display()), e))?;
    let books: Vec<Book> = serde_json::from_str(&content).map_err(|e| {
        BookstoreError::validation(format!("{}: {}", args.file.display(), e))
    })?;

    let service = BookService::new(open_store(&config).await?, config.catalog.isbn_length);
    let added = service.add_books(books).await?;

    for book in &added {
        ui::step_ok_detail(&ctx, &book.name, &book.id);
    }
    let target = config
        .repository
        .data_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "memory".to_string());
    ui::step_ok_detail(&ctx, &format!("Imported {} book(s)", added.len()), &target);

    Ok(())
}
