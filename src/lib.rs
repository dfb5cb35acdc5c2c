//! A 2D world of rooms, tables placed in rooms and disc shaped objects placed on tables, with
//! constrained random placement.


pub mod domain;
pub mod render;
