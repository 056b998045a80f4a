use crate::parsing::Category;
use crate::parsing::registry::Rule;

/// Definition lists: `- term := definition` lines.
///
/// No custom sub-parser is needed. The list rule hands its block to the
/// driver restricted to the term and definition categories, and these rules
/// hand each boundary back with a negative end offset so the next cycle sees
/// it: a term gives back the `:=` that opens its definition, and a definition
/// closed by the next term gives back that term's `-`.
pub struct DefinitionList;

impl DefinitionList {
    pub const TAG: &'static str = "dl";
    pub const TERM_TAG: &'static str = "dt";
    pub const DEFINITION_TAG: &'static str = "dd";

    /// List, term, then the three definition endings in priority order:
    /// next term, end of block, explicit `=:` close.
    pub fn rules() -> [Rule; 5] {
        use Category::{DefinitionDefinition, DefinitionTerm, List};

        [
            Rule::new(r"(- .* := .*)\n*$", Self::TAG, List, Category::DEFINITION),
            Rule::new(r"- (.*) :=", Self::TERM_TAG, DefinitionTerm, Category::PHRASE)
                .with_end_offset(-2),
            Rule::new(
                r":= ([^\n]*)\n-",
                Self::DEFINITION_TAG,
                DefinitionDefinition,
                Category::PHRASE,
            )
            .with_end_offset(-1),
            Rule::new(
                r":= ([^\n]*)\n$",
                Self::DEFINITION_TAG,
                DefinitionDefinition,
                Category::PHRASE,
            ),
            Rule::new(
                r":= (.*) =:\n",
                Self::DEFINITION_TAG,
                DefinitionDefinition,
                Category::PHRASE,
            ),
        ]
    }
}
