// Scoring engine: role store, lexical (TF-IDF) and semantic (embedding) matchers,
// technology-term comparison and remark tiers. Nothing here touches HTTP.

pub mod entities;
pub mod keywords;
pub mod lexical;
pub mod remarks;
pub mod roles;
pub mod score;
pub mod semantic;
