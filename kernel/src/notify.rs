use crate::KernelError;

#[async_trait::async_trait]
pub trait Notifier: 'static + Sync + Send {
    async fn send(&self, message: &str) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnNotifier: 'static + Sync + Send {
    type Notifier: Notifier;
    fn notifier(&self) -> &Self::Notifier;
}
