pub mod check_webhooks;
pub mod notify_webhook;

#[cfg(test)]
pub(crate) mod test_support;
