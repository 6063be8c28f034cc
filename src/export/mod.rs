//! Export renderers for the contact collection.

pub mod vcf;

pub use vcf::render_vcf;
