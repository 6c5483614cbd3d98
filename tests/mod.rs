//! Test suite for SafeTrack
//!
//! This module organizes all tests

pub mod common;
