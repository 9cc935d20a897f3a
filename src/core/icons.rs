//! Display glyphs for tree entries.  Pure lookups, no I/O.

pub const DOCKER: &str = "🐳";
pub const GENERIC_FILE: &str = "📄";
pub const DIR_OPEN: &str = "📂";
pub const DIR_CLOSED: &str = "📁";

/// Glyph for a file name.
///
/// A name equal to `start` (any case) or exactly `Dockerfile` always gets the
/// whale, whatever its extension.  Otherwise the lower-cased text after the
/// last `.` picks the glyph; a name without a dot is treated as its own
/// extension.
pub fn file_icon(filename: &str) -> &'static str {
    let name = filename.to_lowercase();
    if name == "start" || filename == "Dockerfile" {
        return DOCKER;
    }

    let ext = name.rsplit('.').next().unwrap_or(name.as_str());
    match ext {
        "tf" | "hcl" => "🏗️",
        "md" | "mdx" => "📝",
        "json" => "📋",
        "yaml" | "yml" => "⚙️",
        "sh" | "bash" => "🔧",
        "py" => "🐍",
        "js" | "jsx" => "📜",
        "ts" | "tsx" => "🔷",
        "css" | "scss" | "sass" => "🎨",
        "html" | "htm" => "🌐",
        _ => GENERIC_FILE,
    }
}

pub fn dir_icon(expanded: bool) -> &'static str {
    if expanded {
        DIR_OPEN
    } else {
        DIR_CLOSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_names_win_over_extension() {
        assert_eq!(file_icon("start"), DOCKER);
        assert_eq!(file_icon("START"), DOCKER);
        assert_eq!(file_icon("Dockerfile"), DOCKER);
        // Only the exact spelling counts for Dockerfile.
        assert_eq!(file_icon("dockerfile"), GENERIC_FILE);
        assert_eq!(file_icon("Dockerfile.dev"), GENERIC_FILE);
    }

    #[test]
    fn extension_table() {
        assert_eq!(file_icon("main.tf"), "🏗️");
        assert_eq!(file_icon("README.MD"), "📝");
        assert_eq!(file_icon("values.yml"), "⚙️");
        assert_eq!(file_icon("deploy.sh"), "🔧");
        assert_eq!(file_icon("app.py"), "🐍");
        assert_eq!(file_icon("index.tsx"), "🔷");
        assert_eq!(file_icon("site.scss"), "🎨");
        assert_eq!(file_icon("page.htm"), "🌐");
        assert_eq!(file_icon("package.json"), "📋");
    }

    #[test]
    fn unknown_and_odd_names_fall_back() {
        for name in ["", ".", "Makefile", "archive.tar.gz", "noext", "trailing."] {
            assert_eq!(file_icon(name), GENERIC_FILE, "{name}");
        }
        // Extension-less names equal to a known extension still match it.
        assert_eq!(file_icon("json"), "📋");
    }

    #[test]
    fn folder_glyphs() {
        assert_eq!(dir_icon(true), DIR_OPEN);
        assert_eq!(dir_icon(false), DIR_CLOSED);
    }
}
