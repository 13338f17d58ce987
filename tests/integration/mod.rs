//! Integration tests for the workout tagging pipeline

mod cli_parse;
mod group_assignment;
mod support;
mod tag_run;
