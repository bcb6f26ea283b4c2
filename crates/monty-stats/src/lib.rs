//! Statistical helpers for judging simulated win rates.
//!
//! - **Proportions**: point estimate, standard error and Wilson score interval
//!   for a success count out of a number of trials
//! - **Chi-square**: goodness-of-fit statistic and critical values, used to
//!   check that observed frequencies agree with expected ones
//!
//! # Modules
//!
//! - [`proportion`]: Binomial proportion estimates
//! - [`chi_square`]: Pearson's chi-square goodness-of-fit test
//!
//! # Examples
//!
//! ## Estimating a win rate
//!
//! ```
//! use monty_stats::proportion::ProportionEstimate;
//!
//! let estimate = ProportionEstimate::new(667, 1000).unwrap();
//! assert!(estimate.contains(2.0 / 3.0));
//! ```
//!
//! ## Testing a distribution for uniformity
//!
//! ```
//! use monty_stats::chi_square::{GoodnessOfFit, Significance};
//!
//! let observed = [2510, 2475, 2530, 2485];
//! let expected = [2500.0; 4];
//! let fit = GoodnessOfFit::test(&observed, &expected, Significance::P05).unwrap();
//! assert!(fit.is_consistent());
//! ```

pub mod chi_square;
pub mod proportion;
