//! Directory listing module
//!
//! Renders an HTML index for directories that have no index file.

use std::fmt::Write as _;
use std::io;
use std::path::Path;
use tokio::fs;

/// Render the listing page for `dir`, requested as `request_path`
pub async fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry.file_type().await.is_ok_and(|t| t.is_symlink());
        // Follows symlinks, so a link to a directory links with a slash
        let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_key(|e| e.name.to_lowercase());

    let display_path = urlencoding::decode(request_path)
        .map_or_else(|_| request_path.to_string(), |p| p.into_owned());
    let title = format!("Directory listing for {}", escape_html(&display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");
    for entry in &entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            entry.href(),
            escape_html(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Ok(html)
}

struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl ListingEntry {
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::TestRoot;

    #[tokio::test]
    async fn test_entries_sorted_case_insensitively() {
        let root = TestRoot::new("listing-sorted");
        root.write("b.js", "");
        root.write("A.css", "");
        root.mkdir("img");

        let html = render(root.path(), "/").await.unwrap();
        let a = html.find("A.css").unwrap();
        let b = html.find("b.js").unwrap();
        let img = html.find(r#"<a href="img/">img/</a>"#).unwrap();
        let index = html.find("index.html").unwrap();
        assert!(a < b && b < img && img < index);
        assert!(html.contains("<title>Directory listing for /</title>"));
    }

    #[tokio::test]
    async fn test_names_are_encoded_and_escaped() {
        let root = TestRoot::new("listing-escape");
        let dir = root.mkdir("my files");
        std::fs::write(dir.join("a&b <1>.txt"), "").unwrap();

        let html = render(&dir, "/my%20files/").await.unwrap();
        assert!(html.contains("<h1>Directory listing for /my files/</h1>"));
        assert!(html.contains(r#"<a href="a%26b%20%3C1%3E.txt">a&amp;b &lt;1&gt;.txt</a>"#));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_marker() {
        let root = TestRoot::new("listing-symlink");
        std::os::unix::fs::symlink(root.path().join("index.html"), root.path().join("home.html"))
            .unwrap();

        let html = render(root.path(), "/").await.unwrap();
        assert!(html.contains(r#"<a href="home.html">home.html@</a>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    }
}
