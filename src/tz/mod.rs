//! The zone-processor engine: decoding packed TZDB tables, generating and
//! caching transitions per (zone, year), and resolving instants between
//! epoch-seconds and wall-clock representations.
pub mod assign;
pub mod find;
pub mod generator;
pub mod info;
pub mod matching;
pub mod processor;
pub mod storage;
pub mod transition;
pub mod zonedb;
