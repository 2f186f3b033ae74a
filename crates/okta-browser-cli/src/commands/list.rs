use anyhow::{Context, Result};
use okta_browser::{Directory, DirectoryEntry};

pub async fn run(directory: &dyn Directory) -> Result<()> {
    let entries = directory
        .list_entries()
        .await
        .with_context(|| format!("failed to list users from {}", directory.label()))?;

    for line in format_entries(&entries) {
        println!("{line}");
    }

    eprintln!("{} users", entries.len());
    Ok(())
}

/// One line per entry: the id, padded to the widest id, then the label.
fn format_entries(entries: &[DirectoryEntry]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|e| e.id.as_str().len())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| match &entry.label {
            Some(label) => format!("{:<width$}  {label}", entry.id.as_str()),
            None => entry.id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use okta_browser::ProfileRecord;
    use okta_browser::test_support::InMemoryDirectory;

    use super::*;

    #[test]
    fn ids_are_padded_to_align_labels() {
        let lines = format_entries(&[
            DirectoryEntry::new("al").with_label("Alice Liddell"),
            DirectoryEntry::new("bob@example.com"),
            DirectoryEntry::new("00u3").with_label("unknown"),
        ]);
        assert_eq!(
            lines,
            vec![
                "al               Alice Liddell",
                "bob@example.com",
                "00u3             unknown",
            ]
        );
    }

    #[test]
    fn empty_directory_formats_nothing() {
        assert!(format_entries(&[]).is_empty());
    }

    #[tokio::test]
    async fn lists_in_memory_directory() {
        let mut dir = InMemoryDirectory::new("test");
        dir.add(DirectoryEntry::new("alice"), ProfileRecord::unavailable());
        assert!(run(&dir).await.is_ok());
    }

    #[tokio::test]
    async fn lists_empty_directory() {
        let dir = InMemoryDirectory::new("empty");
        assert!(run(&dir).await.is_ok());
    }
}
