/// User-visible alerts.
pub trait NotifierPort: Send + Sync {
    fn alert(&self, message: &str);
}
