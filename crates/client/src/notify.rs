/// Fire-and-forget user notifications.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// Blocking alert, used when the form can't be loaded.
    fn alert(&self, message: &str);
}

/// Records a new location in the user's history.
pub trait Navigator {
    fn navigate(&self, path: &str);
}
