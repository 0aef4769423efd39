//! The import-relevant shape of a compilation unit.

use crate::import_name::ImportName;

/// The `package` declaration of a compilation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDecl {
    /// The package name.
    pub name: String,
    /// Byte offset just past the terminating `;`.
    pub end: u32,
}

/// One `import` declaration and its byte range (`import` through `;`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    /// The imported name.
    pub name: ImportName,
    /// Byte offset of the `import` keyword.
    pub start: u32,
    /// Byte offset just past the terminating `;`.
    pub end: u32,
}

/// A compilation unit reduced to what import rewriting needs: the package
/// declaration and the imports, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    /// The package declaration, if any.
    pub package: Option<PackageDecl>,
    /// The import declarations in source order.
    pub imports: Vec<ImportDecl>,
}

impl CompilationUnit {
    /// Recognises the leading `package` and `import` declarations of Java-like
    /// source text.
    ///
    /// Whitespace and comments between declarations are skipped; scanning stops
    /// at the first token that starts neither declaration.
    pub fn scan(text: &str) -> Self {
        let mut cursor = Cursor { text, pos: 0 };
        let mut unit = CompilationUnit::default();

        cursor.skip_trivia();
        if let Some((name, _, end)) = cursor.declaration("package") {
            unit.package = Some(PackageDecl { name, end });
            cursor.skip_trivia();
        }
        while let Some((name, start, end)) = cursor.declaration("import") {
            unit.imports.push(ImportDecl {
                name: ImportName::parse(&name),
                start,
                end,
            });
            cursor.skip_trivia();
        }
        unit
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let trimmed = self.rest().trim_start();
            self.pos = self.text.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                self.pos += body.find("*/").map_or(trimmed.len(), |end| end + 4);
            } else {
                return;
            }
        }
    }

    /// Consumes `keyword <body>;` and returns the normalised body and the
    /// declaration's byte range.
    fn declaration(&mut self, keyword: &str) -> Option<(String, u32, u32)> {
        let after = self.rest().strip_prefix(keyword)?;
        if !after.starts_with(char::is_whitespace) {
            return None;
        }
        let semi = after.find(';')?;
        let body = after[..semi].split_whitespace().collect::<Vec<_>>().join(" ");
        let start = self.pos;
        let end = start + keyword.len() + semi + 1;
        self.pos = end;
        Some((body, start as u32, end as u32))
    }
}
