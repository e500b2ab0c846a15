//! The fixed order of script sections.
use std::fmt;

/// One section of a generated script.
///
/// Sections are emitted in the order of [`Stage::ORDER`], each exactly once.
/// The order is what lets a later statement refer to a placeholder assigned by
/// an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Header,
    Cleanup,
    LanguageMap,
    Content,
    Attachments,
    AttachmentMeta,
    ContentMeta,
    ContentGroupTerms,
    ContentGroupTaxonomy,
    PlainTerms,
    TermGroupTerms,
    TermGroupTaxonomy,
    PlainTaxonomy,
    TermMeta,
    AssignTermLanguages,
    AssignContentLanguages,
    ContentRelationships,
    TermRelationships,
    BackfillContentGroups,
    BackfillTermGroups,
    Footer,
}

impl Stage {
    pub const ORDER: [Stage; 21] = [
        Stage::Header,
        Stage::Cleanup,
        Stage::LanguageMap,
        Stage::Content,
        Stage::Attachments,
        Stage::AttachmentMeta,
        Stage::ContentMeta,
        Stage::ContentGroupTerms,
        Stage::ContentGroupTaxonomy,
        Stage::PlainTerms,
        Stage::TermGroupTerms,
        Stage::TermGroupTaxonomy,
        Stage::PlainTaxonomy,
        Stage::TermMeta,
        Stage::AssignTermLanguages,
        Stage::AssignContentLanguages,
        Stage::ContentRelationships,
        Stage::TermRelationships,
        Stage::BackfillContentGroups,
        Stage::BackfillTermGroups,
        Stage::Footer,
    ];

    pub fn position(self) -> usize {
        Stage::ORDER
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or(Stage::ORDER.len())
    }

    pub fn next(self) -> Option<Stage> {
        Stage::ORDER.get(self.position() + 1).copied()
    }

    /// Title of the comment block opening the section. The header and footer
    /// carry no block.
    pub fn title(self, content_type: &str) -> Option<String> {
        let title = match self {
            Stage::Header | Stage::Footer => return None,
            Stage::Cleanup => return Some(format!("Delete existing data for post_type: {}", content_type)),
            Stage::LanguageMap => "Language Mapping (resolved against the destination languages)",
            Stage::Content => "Posts (will get new IDs, keeping original author IDs)",
            Stage::Attachments => "Featured Images (attachment posts)",
            Stage::AttachmentMeta => "Attachment Meta (for featured images)",
            Stage::ContentMeta => "Post Meta (with mapped post IDs, includes translation data)",
            Stage::ContentGroupTerms => "Translation Group Terms (will get new IDs)",
            Stage::ContentGroupTaxonomy => "Translation Group Term Taxonomy",
            Stage::PlainTerms => "Regular Terms (will get new IDs)",
            Stage::TermGroupTerms => "Term Translation Group Terms (will get new IDs)",
            Stage::TermGroupTaxonomy => "Term Translation Group Term Taxonomy",
            Stage::PlainTaxonomy => "Regular Term Taxonomy (with mapped term IDs)",
            Stage::TermMeta => "Term Meta (with mapped term IDs)",
            Stage::AssignTermLanguages => "Assign Terms to Languages (extracted from translation groups)",
            Stage::AssignContentLanguages => "Assign Posts to Languages (using existing language terms)",
            Stage::ContentRelationships => "Post to Term Relationships",
            Stage::TermRelationships => "Term Translation Relationships",
            Stage::BackfillContentGroups => {
                "Update Translation Group Descriptions (map language codes to new post IDs)"
            }
            Stage::BackfillTermGroups => {
                "Update Term Translation Group Descriptions (map language codes to new term IDs)"
            }
        };
        Some(title.to_string())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
