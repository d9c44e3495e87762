mod helpers;
mod test_config;
mod test_show;
mod test_sync;
