use crate::error::{Result, SetVersionError};
use regex::{Regex, RegexBuilder};

/// Textual conventions of one assembly-metadata source syntax.
///
/// Describes how attributes are bracketed, how booleans are spelled and which
/// files hold the attributes. Validated once at construction.
#[derive(Debug, Clone)]
pub struct FormatTraits {
    name: String,
    assembly_keyword: String,
    open_attribute_text: String,
    close_attribute_text: String,
    true_keyword: String,
    false_keyword: String,
    file_specification: String,
    empty_constructor_parentheses: bool,
    file_matcher: Regex,
}

/// Plain field values used to build a [`FormatTraits`]
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec<'a> {
    pub name: &'a str,
    pub assembly_keyword: &'a str,
    pub open_attribute_text: &'a str,
    pub close_attribute_text: &'a str,
    pub true_keyword: &'a str,
    pub false_keyword: &'a str,
    pub file_specification: &'a str,
    pub empty_constructor_parentheses: bool,
}

impl FormatTraits {
    /// Build a format descriptor, rejecting empty text fields
    pub fn new(spec: FormatSpec<'_>) -> Result<Self> {
        let fields = [
            ("name", spec.name),
            ("assembly keyword", spec.assembly_keyword),
            ("open attribute text", spec.open_attribute_text),
            ("close attribute text", spec.close_attribute_text),
            ("true keyword", spec.true_keyword),
            ("false keyword", spec.false_keyword),
            ("file specification", spec.file_specification),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(SetVersionError::invalid_value(format!(
                    "Format {} must not be empty",
                    field
                )));
            }
        }

        Ok(FormatTraits {
            name: spec.name.to_string(),
            assembly_keyword: spec.assembly_keyword.to_string(),
            open_attribute_text: spec.open_attribute_text.to_string(),
            close_attribute_text: spec.close_attribute_text.to_string(),
            true_keyword: spec.true_keyword.to_string(),
            false_keyword: spec.false_keyword.to_string(),
            file_specification: spec.file_specification.to_string(),
            empty_constructor_parentheses: spec.empty_constructor_parentheses,
            file_matcher: file_spec_regex(spec.file_specification)?,
        })
    }

    /// C# attribute syntax: `[assembly: Name(...)]` in `AssemblyInfo.cs`
    pub fn csharp() -> Self {
        Self::builtin(FormatSpec {
            name: "csharp",
            assembly_keyword: "assembly",
            open_attribute_text: "[",
            close_attribute_text: "]",
            true_keyword: "true",
            false_keyword: "false",
            file_specification: "AssemblyInfo.cs",
            empty_constructor_parentheses: false,
        })
    }

    /// Visual Basic attribute syntax: `<Assembly: Name(...)>` in `AssemblyInfo.vb`
    pub fn visual_basic() -> Self {
        Self::builtin(FormatSpec {
            name: "vb",
            assembly_keyword: "Assembly",
            open_attribute_text: "<",
            close_attribute_text: ">",
            true_keyword: "True",
            false_keyword: "False",
            file_specification: "AssemblyInfo.vb",
            empty_constructor_parentheses: true,
        })
    }

    /// Look up a built-in format by its configuration name
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Self::csharp()),
            "vb" | "visualbasic" | "vb.net" => Ok(Self::visual_basic()),
            other => Err(SetVersionError::config(format!(
                "Unknown file format '{}'",
                other
            ))),
        }
    }

    fn builtin(spec: FormatSpec<'_>) -> Self {
        let name = spec.name;
        match Self::new(spec) {
            Ok(traits) => traits,
            Err(e) => unreachable!("built-in format '{}' is invalid: {}", name, e),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assembly_keyword(&self) -> &str {
        &self.assembly_keyword
    }

    pub fn open_attribute_text(&self) -> &str {
        &self.open_attribute_text
    }

    pub fn close_attribute_text(&self) -> &str {
        &self.close_attribute_text
    }

    pub fn true_keyword(&self) -> &str {
        &self.true_keyword
    }

    pub fn false_keyword(&self) -> &str {
        &self.false_keyword
    }

    pub fn file_specification(&self) -> &str {
        &self.file_specification
    }

    pub fn empty_constructor_parentheses(&self) -> bool {
        self.empty_constructor_parentheses
    }

    /// Whether a bare file name matches this format's file specification.
    ///
    /// `*` and `?` are wildcards; comparison ignores case.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        self.file_matcher.is_match(file_name)
    }
}

/// Translate a `*`/`?` file specification into an anchored regex
fn file_spec_regex(file_specification: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    for part in file_specification.split_inclusive(['*', '?']) {
        let (literal, wildcard) = match part.chars().last() {
            Some('*') => (&part[..part.len() - 1], ".*"),
            Some('?') => (&part[..part.len() - 1], "."),
            _ => (part, ""),
        };
        pattern.push_str(&regex::escape(literal));
        pattern.push_str(wildcard);
    }
    pattern.push('$');

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            SetVersionError::invalid_value(format!(
                "Invalid file specification '{}': {}",
                file_specification, e
            ))
        })
}
