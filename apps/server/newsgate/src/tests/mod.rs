mod logger;
mod routes;
