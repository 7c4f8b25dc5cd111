//! Integration tests for Bookstore

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn bookstore() -> Command {
        let mut cmd = cargo_bin_cmd!("bookstore");
        cmd.env_remove("BOOKSTORE_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    /// Config file in `dir` persisting the repository next to it
    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.toml");
        let data_file = dir.join("repository.json");
        std::fs::write(
            &path,
            format!(
                "[repository]\ndata_file = {:?}\n\n[catalog]\nisbn_length = 13\n",
                data_file.display().to_string()
            ),
        )
        .unwrap();
        path
    }

    fn write_books(dir: &Path, isbns: &[&str]) -> PathBuf {
        let books: Vec<_> = isbns
            .iter()
            .map(|isbn| {
                serde_json::json!({
                    "name": format!("Book {isbn}"),
                    "author": "Anon",
                    "isbn": isbn,
                    "introduction": ["Intro"],
                    "paragraphs": ["First paragraph"]
                })
            })
            .collect();
        let path = dir.join("books.json");
        std::fs::write(&path, serde_json::to_string(&books).unwrap()).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        bookstore()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("book catalog service"));
    }

    #[test]
    fn version_displays() {
        bookstore()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("bookstore"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.toml");
        bookstore()
            .args(["config", "path", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");

        bookstore()
            .args(["config", "init", "--config"])
            .arg(&config)
            .assert()
            .success();
        assert!(config.exists());

        bookstore()
            .args(["config", "show", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("[repository]"))
            .stdout(predicate::str::contains("isbn_length = 13"));
    }

    #[test]
    fn missing_explicit_config_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        bookstore()
            .args(["list", "--config"])
            .arg(temp.path().join("absent.toml"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration file not found"))
            .stderr(predicate::str::contains("bookstore config init"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        bookstore()
            .args(["list", "--format", "json", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn import_then_list() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        let books = write_books(temp.path(), &["9780000000001", "9780000000002"]);

        bookstore()
            .arg("import")
            .arg(&books)
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("Imported 2 book(s)"));

        bookstore()
            .args(["list", "--format", "plain", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("Book 9780000000001"))
            .stdout(predicate::str::contains("Book 9780000000002"));
    }

    #[test]
    fn import_rejects_duplicate_isbn() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        let books = write_books(temp.path(), &["9780000000001"]);

        bookstore()
            .arg("import")
            .arg(&books)
            .arg("--config")
            .arg(&config)
            .assert()
            .success();

        bookstore()
            .arg("import")
            .arg(&books)
            .arg("--config")
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("A book already exist by ISBN"));
    }

    #[test]
    fn import_rejects_invalid_books() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());
        let books = write_books(temp.path(), &["123"]);

        bookstore()
            .arg("import")
            .arg(&books)
            .arg("--config")
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("ISBN size should be 13"));
    }
}
