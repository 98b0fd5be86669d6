use super::types::ElementRef;

/// Side effects the navigation engine applies to rendered elements.
///
/// Implemented by the UI layer. Handles may point at elements that have
/// already been unmounted; implementations report that through
/// [`is_mounted`](FocusSurface::is_mounted) and the engine skips them.
pub trait FocusSurface {
    fn is_mounted(&self, element: &ElementRef) -> bool;

    /// Add or remove the visual focus marker
    fn set_focus_marker(&mut self, element: &ElementRef, focused: bool);

    /// Bring the element to the middle of its scroll container
    fn scroll_into_view(&mut self, element: &ElementRef);

    /// Move input focus to the element
    fn focus_input(&mut self, element: &ElementRef);

    /// Run the element's select action (a click)
    fn activate(&mut self, element: &ElementRef);
}
