mod analysis;
mod report;

pub use analysis::Analysis;
pub use report::print_analysis;
