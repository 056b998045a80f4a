/// The syntactic class of a rule, used to restrict which rules may fire in a
/// given recursive context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Block,
    List,
    Phrase,
    DefinitionTerm,
    DefinitionDefinition,
}

impl Category {
    /// Categories admitted at the top of every block.
    pub const DOCUMENT: &'static [Category] = &[Category::Block, Category::List, Category::Phrase];
    /// Categories admitted inside running text, list items and table cells.
    pub const PHRASE: &'static [Category] = &[Category::Phrase];
    /// Categories admitted inside a definition list.
    pub const DEFINITION: &'static [Category] =
        &[Category::DefinitionTerm, Category::DefinitionDefinition];
    /// No recursion: captured content is one opaque leaf.
    pub const OPAQUE: &'static [Category] = &[];

    pub fn is_allowed(self, allowed: &[Category]) -> bool {
        allowed.contains(&self)
    }
}
