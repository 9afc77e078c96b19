pub mod extraction;
pub mod compiler; // Rubric + corpus → single outbound request
pub mod prompt_templates;
pub mod generation;
