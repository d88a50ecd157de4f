mod fallback;
mod field_normalizer;
mod gateway;
mod keyword_normalizer;
mod session;
