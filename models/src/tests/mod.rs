mod envelope;
mod news_item;
