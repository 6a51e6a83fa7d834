// Catalog records surfaced to the API and the rendered pages

use serde::{Deserialize, Serialize};

/// Placeholder taxonomy bucket that never appears in public listings.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// True for the sentinel category name. Every loader and listing filters through this.
pub fn is_sentinel_category(name: &str) -> bool {
    name == UNCATEGORIZED
}

/// A sellable item read from the product export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub stock: i64,
    pub images: Vec<String>,
    /// First taxonomy term of the product, `Uncategorized` when the export has none.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A taxonomy term read from the category export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Source taxonomy term id (distinct from the slug).
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lower-case ASCII slug: letters and digits kept, separators collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_dash = true;
    for c in name.chars() {
        match c {
            'a'..='z' | '0'..='9' => {
                out.push(c);
                prev_dash = false;
            }
            'A'..='Z' => {
                out.push(c.to_ascii_lowercase());
                prev_dash = false;
            }
            ' ' | '-' | '_' | '.' | '/' => {
                if !prev_dash {
                    out.push('-');
                    prev_dash = true;
                }
            }
            _ => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_matches_exact_name_only() {
        assert!(is_sentinel_category("Uncategorized"));
        assert!(!is_sentinel_category("uncategorized"));
        assert!(!is_sentinel_category("Uncategorized Items"));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Chef's Knife 20cm"), "chefs-knife-20cm");
        assert_eq!(slugify("  Cast-Iron / Pan  "), "cast-iron-pan");
        assert_eq!(slugify("A.B_C"), "a-b-c");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let product = Product {
            id: "1".into(),
            name: "Knife".into(),
            slug: "knife".into(),
            price: 10.0,
            stock: 100,
            images: vec![],
            category: "Cutting".into(),
            brand: None,
            description: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("brand").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["category"], "Cutting");
    }
}
