// Skill knowledge base: alias normalization, cluster similarity, category inference.
// All tables are static and read-only; nothing here touches the database.

pub mod category;
pub mod normalizer;
pub mod similarity;
