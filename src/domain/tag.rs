use crate::domain::{FormatTraits, VersionProperties};
use crate::error::{Result, SetVersionError};
use regex::bytes::{Regex, RegexBuilder};

/// Produces the value text of one tag, e.g. `("Twaddle Software")`
pub type TagFormatter = fn(&FormatTraits, &VersionProperties) -> String;

/// Every tag written into assembly metadata files, keyed by attribute name.
///
/// New tags are appended to files in this order.
pub const STANDARD_TAGS: &[(&str, TagFormatter)] = &[
    ("AssemblyCompany", assembly_company),
    ("AssemblyCopyright", assembly_copyright),
    ("AssemblyCulture", assembly_culture),
    ("AssemblyFileVersion", assembly_file_version),
    ("AssemblyInformationalVersion", assembly_informational_version),
    ("AssemblyProduct", assembly_product),
    ("AssemblyTrademark", assembly_trademark),
    ("AssemblyVersion", assembly_version),
    ("CLSCompliant", cls_compliant),
    ("ComVisible", com_visible),
    ("NeutralResourcesLanguage", neutral_resources_language),
];

pub fn assembly_company(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(version.company_name())
}

pub fn assembly_copyright(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(&format!(
        "Copyright © {} {}-{}",
        version.company_name(),
        version.copyright_start_year(),
        version.build_year()
    ))
}

pub fn assembly_culture(_traits: &FormatTraits, _version: &VersionProperties) -> String {
    quoted("")
}

pub fn assembly_file_version(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(&version.full_version())
}

pub fn assembly_informational_version(
    _traits: &FormatTraits,
    version: &VersionProperties,
) -> String {
    quoted(&version.full_version())
}

pub fn assembly_product(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(version.product_name())
}

pub fn assembly_trademark(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(version.trademark())
}

/// Binding version: revision and build are always zero
pub fn assembly_version(_traits: &FormatTraits, version: &VersionProperties) -> String {
    quoted(&format!("{}.{}.0.0", version.major(), version.minor()))
}

pub fn cls_compliant(traits: &FormatTraits, _version: &VersionProperties) -> String {
    format!("({})", traits.true_keyword())
}

pub fn com_visible(traits: &FormatTraits, _version: &VersionProperties) -> String {
    format!("({})", traits.false_keyword())
}

pub fn neutral_resources_language(_traits: &FormatTraits, _version: &VersionProperties) -> String {
    "(\"en\", UltimateResourceFallbackLocation.MainAssembly)".to_string()
}

fn quoted(value: &str) -> String {
    format!("(\"{}\")", value)
}

/// One named tag and the function rendering its value
#[derive(Debug, Clone, Copy)]
pub struct Tag {
    pub name: &'static str,
    pub formatter: TagFormatter,
}

impl Tag {
    /// Render the full attribute line: `<open><keyword>: <Name><value><close>`
    pub fn render_line(&self, traits: &FormatTraits, version: &VersionProperties) -> String {
        format!(
            "{}{}: {}{}{}",
            traits.open_attribute_text(),
            traits.assembly_keyword(),
            self.name,
            (self.formatter)(traits, version),
            traits.close_attribute_text()
        )
    }

    /// The 16 literal prefixes that [`LineMatcher::match_line`] accepts for this tag
    pub fn spelling_variants(&self, traits: &FormatTraits) -> Vec<String> {
        let mut variants = Vec::with_capacity(16);
        for before in ["", " "] {
            for after in ["", " "] {
                for suffix in ["", "Attribute"] {
                    for terminator in [traits.close_attribute_text(), "("] {
                        variants.push(format!(
                            "{}{}{}:{}{}{}{}",
                            traits.open_attribute_text(),
                            traits.assembly_keyword(),
                            before,
                            after,
                            self.name,
                            suffix,
                            terminator
                        ));
                    }
                }
            }
        }
        variants
    }
}

/// Accepted: an optional single space on either side of the colon, an
/// optional `Attribute` suffix, then `(` or the close text. Case is ignored.
fn line_pattern(tag_name: &str, traits: &FormatTraits) -> std::result::Result<Regex, regex::Error> {
    let pattern = format!(
        r"^{}{} ?: ?{}(?:Attribute)?(?:\(|{})",
        regex::escape(traits.open_attribute_text()),
        regex::escape(traits.assembly_keyword()),
        regex::escape(tag_name),
        regex::escape(traits.close_attribute_text())
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Ordered set of tags a rewrite keeps in sync.
///
/// Built explicitly and passed to the updater; never a process-wide table.
#[derive(Debug, Clone)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    /// The standard assembly tag set
    pub fn standard() -> Self {
        TagCatalog {
            tags: STANDARD_TAGS
                .iter()
                .map(|&(name, formatter)| Tag { name, formatter })
                .collect(),
        }
    }

    /// Build a catalog from explicit entries; an empty list is a configuration error
    pub fn from_entries(entries: &[(&'static str, TagFormatter)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(SetVersionError::config("No Tags Defined."));
        }
        let mut tags: Vec<Tag> = Vec::with_capacity(entries.len());
        for &(name, formatter) in entries {
            if tags.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
                return Err(SetVersionError::config(format!(
                    "Tag '{}' is defined more than once",
                    name
                )));
            }
            tags.push(Tag { name, formatter });
        }
        Ok(TagCatalog { tags })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tags.iter().map(|t| t.name).collect()
    }

    /// Look up a tag by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Compile the line patterns of every tag for one format
    pub fn line_matcher(&self, traits: &FormatTraits) -> Result<LineMatcher<'_>> {
        let mut entries = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let re = line_pattern(tag.name, traits).map_err(|e| {
                SetVersionError::invalid_value(format!(
                    "Cannot build matcher for tag '{}' in format '{}': {}",
                    tag.name,
                    traits.name(),
                    e
                ))
            })?;
            entries.push((tag, re));
        }
        Ok(LineMatcher { entries })
    }
}

/// Precompiled tag patterns for one catalog and one format.
///
/// Matches raw line bytes, so lines in a legacy 8-bit encoding are still
/// recognised.
pub struct LineMatcher<'a> {
    entries: Vec<(&'a Tag, Regex)>,
}

impl<'a> LineMatcher<'a> {
    /// First tag whose spelling `line` starts with, in catalog order
    pub fn match_line(&self, line: impl AsRef<[u8]>) -> Option<&'a Tag> {
        let line = line.as_ref();
        if line.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, re)| re.is_match(line))
            .map(|(tag, _)| *tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn version() -> VersionProperties {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut version = VersionProperties::new(now);
        version.set_major(2).unwrap();
        version.set_minor(5);
        version.set_subversion_revision(812);
        version.set_build_number(44);
        version
    }

    fn format(name: &str) -> String {
        let catalog = TagCatalog::standard();
        let tag = catalog.get(name).unwrap();
        (tag.formatter)(&FormatTraits::csharp(), &version())
    }

    #[test]
    fn test_tag_outputs() {
        assert_eq!(format("AssemblyCompany"), "(\"Twaddle Software\")");
        assert_eq!(
            format("AssemblyCopyright"),
            "(\"Copyright © Twaddle Software 1997-2024\")"
        );
        assert_eq!(format("AssemblyCulture"), "(\"\")");
        assert_eq!(format("AssemblyFileVersion"), "(\"2.5.812.44\")");
        assert_eq!(format("AssemblyProduct"), "(\"Build Utilities\")");
        assert_eq!(format("AssemblyTrademark"), "(\"\")");
        assert_eq!(format("AssemblyVersion"), "(\"2.5.0.0\")");
        assert_eq!(format("CLSCompliant"), "(true)");
        assert_eq!(format("ComVisible"), "(false)");
        assert_eq!(
            format("NeutralResourcesLanguage"),
            "(\"en\", UltimateResourceFallbackLocation.MainAssembly)"
        );
    }

    #[test]
    fn test_file_and_informational_versions_agree() {
        let mut v = version();
        for (revision, build) in [(0, 0), (1, 1), (9999, 123), (u32::MAX, 7)] {
            v.set_subversion_revision(revision);
            v.set_build_number(build);
            let traits = FormatTraits::csharp();
            assert_eq!(
                assembly_file_version(&traits, &v),
                assembly_informational_version(&traits, &v)
            );
            assert_eq!(assembly_version(&traits, &v), "(\"2.5.0.0\")");
        }
    }

    #[test]
    fn test_boolean_keywords_follow_format() {
        let vb = FormatTraits::visual_basic();
        assert_eq!(cls_compliant(&vb, &version()), "(True)");
        assert_eq!(com_visible(&vb, &version()), "(False)");
    }

    #[test]
    fn test_render_line() {
        let catalog = TagCatalog::standard();
        let tag = catalog.get("assemblyproduct").unwrap();
        assert_eq!(
            tag.render_line(&FormatTraits::csharp(), &version()),
            "[assembly: AssemblyProduct(\"Build Utilities\")]"
        );
        assert_eq!(
            tag.render_line(&FormatTraits::visual_basic(), &version()),
            "<Assembly: AssemblyProduct(\"Build Utilities\")>"
        );
    }

    fn matched(line: &str) -> Option<&'static str> {
        let catalog = TagCatalog::standard();
        let matcher = catalog.line_matcher(&FormatTraits::csharp()).unwrap();
        matcher.match_line(line).map(|t| t.name)
    }

    #[test]
    fn test_all_sixteen_variants_match() {
        let traits = FormatTraits::csharp();
        let catalog = TagCatalog::standard();
        let matcher = catalog.line_matcher(&traits).unwrap();
        for tag in catalog.iter() {
            let variants = tag.spelling_variants(&traits);
            assert_eq!(variants.len(), 16);
            for variant in variants {
                let name = matcher.match_line(&variant).map(|t| t.name);
                assert_eq!(name, Some(tag.name), "{}", variant);
                let with_tail = format!("{}\"ignored\")]   // trailing", variant);
                let name = matcher.match_line(&with_tail).map(|t| t.name);
                assert_eq!(name, Some(tag.name), "{}", with_tail);
            }
        }
    }

    #[test]
    fn test_variants_are_distinct() {
        let traits = FormatTraits::csharp();
        let tag = *TagCatalog::standard().get("ComVisible").unwrap();
        let mut variants = tag.spelling_variants(&traits);
        variants.sort();
        variants.dedup();
        assert_eq!(variants.len(), 16);
        assert!(variants.contains(&"[assembly : ComVisibleAttribute(".to_string()));
        assert!(variants.contains(&"[assembly:ComVisible]".to_string()));
    }

    #[test]
    fn test_line_matching_is_case_insensitive() {
        assert_eq!(
            matched("[ASSEMBLY: ASSEMBLYCOMPANY(\"x\")]"),
            Some("AssemblyCompany")
        );
        assert_eq!(
            matched("[Assembly:assemblycompanyattribute(\"x\")]"),
            Some("AssemblyCompany")
        );
    }

    #[test]
    fn test_line_matching_rejects_other_spellings() {
        assert_eq!(matched(""), None);
        assert_eq!(matched("using System.Reflection;"), None);
        assert_eq!(matched("  [assembly: AssemblyCompany(\"x\")]"), None);
        assert_eq!(matched("[assembly:  AssemblyCompany(\"x\")]"), None);
        assert_eq!(matched("[assembly: AssemblyCompanyName(\"x\")]"), None);
        assert_eq!(matched("// [assembly: AssemblyCompany(\"x\")]"), None);
        assert_eq!(matched("[module: AssemblyCompany(\"x\")]"), None);
    }

    #[test]
    fn test_prefix_tags_do_not_shadow_each_other() {
        assert_eq!(
            matched("[assembly: AssemblyFileVersion(\"1.0.0.0\")]"),
            Some("AssemblyFileVersion")
        );
        assert_eq!(
            matched("[assembly: AssemblyVersion(\"1.0.0.0\")]"),
            Some("AssemblyVersion")
        );
    }

    #[test]
    fn test_line_matcher_accepts_non_utf8_bytes() {
        let catalog = TagCatalog::standard();
        let matcher = catalog.line_matcher(&FormatTraits::csharp()).unwrap();
        let line: &[u8] = b"[assembly: AssemblyCopyright(\"\xA9 Acme 2001\")]";
        assert_eq!(matcher.match_line(line).map(|t| t.name), Some("AssemblyCopyright"));
        assert!(matcher.match_line(b"// \xA9 Acme").is_none());
    }

    #[test]
    fn test_line_matcher_follows_format() {
        let catalog = TagCatalog::standard();
        let matcher = catalog.line_matcher(&FormatTraits::visual_basic()).unwrap();
        assert_eq!(
            matcher.match_line("<assembly: ComVisibleAttribute(False)>").map(|t| t.name),
            Some("ComVisible")
        );
        assert!(matcher.match_line("[assembly: ComVisible(false)]").is_none());
    }

    #[test]
    fn test_empty_catalog_is_configuration_error() {
        let err = TagCatalog::from_entries(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: No Tags Defined.");
    }

    #[test]
    fn test_duplicate_tag_names_rejected() {
        let entries: &[(&'static str, TagFormatter)] = &[
            ("AssemblyCompany", assembly_company),
            ("assemblycompany", assembly_product),
        ];
        assert!(TagCatalog::from_entries(entries).is_err());
    }

    #[test]
    fn test_standard_catalog_order() {
        let catalog = TagCatalog::standard();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.names().first(), Some(&"AssemblyCompany"));
        assert_eq!(catalog.names().last(), Some(&"NeutralResourcesLanguage"));
    }
}
