pub mod roster_dtos;
