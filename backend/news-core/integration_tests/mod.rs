mod gateway;
mod helpers;
mod orchestrator;
