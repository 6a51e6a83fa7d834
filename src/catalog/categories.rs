// Category export loader

use std::path::Path;

use tracing::{debug, warn};

use super::csv_rows::{Row, RowReader};
use super::model::{is_sentinel_category, Category};
use super::source::{CatalogError, Loaded};

/// Map one taxonomy row. `None` for unnamed rows and for the sentinel bucket.
pub fn category_from_row(row: &Row) -> Option<Category> {
    let name = row.get("name");
    if name.is_empty() || is_sentinel_category(name) {
        return None;
    }
    Some(Category {
        id: row.get("term_id").to_string(),
        name: name.to_string(),
        slug: row.get("slug").to_string(),
        description: row.non_empty("description").map(str::to_string),
    })
}

pub fn read_categories(path: &Path) -> Result<Loaded<Category>, CatalogError> {
    let reader = RowReader::open(path)?;
    let mut loaded = Loaded::default();

    for row in reader {
        let row = row?;
        match category_from_row(&row) {
            Some(category) => loaded.items.push(category),
            // The sentinel is filtered, not skipped.
            None if is_sentinel_category(row.get("name")) => {}
            None => {
                debug!(row = row.number, "skipping unnamed category row");
                loaded.skipped += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        loaded = loaded.items.len(),
        skipped = loaded.skipped,
        "categories loaded"
    );
    Ok(loaded)
}

/// Direct-read path: a missing or unreadable file yields no categories.
pub fn load_categories(path: &Path) -> Vec<Category> {
    match read_categories(path) {
        Ok(loaded) => loaded.items,
        Err(err @ CatalogError::SourceMissing { .. }) => {
            warn!(error = %err, "categories file not found");
            Vec::new()
        }
        Err(err) => {
            warn!(error = ?err, "categories file could not be read");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn excludes_the_sentinel_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");
        fs::write(
            &path,
            "term_id,name,slug,description,display_type,parent,thumbnail\n\
             15,Uncategorized,uncategorized,,,0,\n\
             21,Cutting,cutting,\"Knives, shears\",default,0,\n\
             22,uncategorized,lower,,default,0,\n\
             23,,nameless,,default,0,\n",
        )
        .unwrap();

        let loaded = read_categories(&path).unwrap();
        let names: Vec<&str> = loaded.items.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Cutting", "uncategorized"]);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.items[0].id, "21");
        assert_eq!(loaded.items[0].description.as_deref(), Some("Knives, shears"));
        assert_eq!(loaded.items[1].description, None);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_categories(&dir.path().join("categories.csv")).is_empty());
    }
}
