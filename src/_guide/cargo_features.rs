/*!

# Cargo Features

**Note: none of this crate's features are enabled by default.**

* **`log`**: Enable logging with [the `log` crate](https://docs.rs/log). Shrink
  sessions log their start and result at `info` level, budget exhaustion and
  predicate anomalies at `warn` level, every accepted candidate at `debug`
  level, and every predicate call at `trace` level.

* **`check`**: Enable the `diminish::check` module for writing property-based
  smoke tests whose failures are shrunk with `diminish`. Implies `log`.

 */
