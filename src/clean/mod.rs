/// Measurement cleaning stages.
///
/// Two related but deliberately different policies live here:
/// - `sentinels` — per-cell: a value exactly matching a configured sentinel
///   encoding becomes missing, the row survives.
/// - `bounds` — per-row: a value outside its plausibility bound discards the
///   whole observation.
///
/// Sentinels are scrubbed before bounds are checked, so an instrument's
/// "no reading" encoding is labeled missing rather than discarded as an
/// extreme reading.

pub mod bounds;
pub mod sentinels;
