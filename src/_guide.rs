/*!

Tutorials, overviews, and etc... for the `diminish` crate.

All the documentation that isn't API reference.

# Table of Contents

* [How Shrinking Works][shrinking]
* [Writing Custom Shrinkers][custom_shrinkers]
* [Cargo Features][cargo_features]
* [Minimum Supported Rust Version][msrv]

 */

pub mod cargo_features;
pub mod custom_shrinkers;
pub mod msrv;
pub mod shrinking;
