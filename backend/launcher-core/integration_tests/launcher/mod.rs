mod default;
mod end_to_end;
mod ensure;
mod health;
mod helpers;
mod runner;
mod target;
