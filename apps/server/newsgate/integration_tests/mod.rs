mod helpers;
mod keywords;
mod news;
mod server;
