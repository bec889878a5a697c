pub mod discipline;
pub mod game_player_stat;
pub mod import_error;
pub mod match_game;
pub mod matches;
pub mod player;
pub mod report;
pub mod squad_member;
pub mod team;
pub mod team_profile;
pub mod tournament;
pub mod tournament_registration;
