//! Climate-zone composition: code labels and the wide → long reshape that
//! feeds the stacked-area chart.

pub mod labels;
pub mod reshape;
