mod helpers;
mod profile;
