use anyhow::Result;

/// Component lifecycle hooks.
///
/// Every hook has a no-op default, so a component implements only the subset it
/// cares about. Hooks must tolerate being called in the state they establish:
/// stopping a stopped component is harmless.
#[allow(async_fn_in_trait)]
pub trait Lifecycle {
    /// Loads resources and component dependencies.
    ///
    /// The only asynchronous hook; await it to completion before the component
    /// is used.
    async fn load(&mut self) -> Result<()> {
        Ok(())
    }

    /// Starts or enables the component.
    fn start(&mut self) {}

    /// Stops or disables the component.
    fn stop(&mut self) {}

    /// Updates component state, called once per loop tick.
    fn update(&mut self) {}

    /// Called when the viewport has been resized.
    fn resize(&mut self) {}

    /// Stops the component and releases the resources it owns.
    fn dispose(&mut self) {}
}
