pub mod achievement;
pub mod admin;
pub mod message;
pub mod mission;
pub mod npc;
pub mod player;
pub mod team;
