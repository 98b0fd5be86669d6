use std::collections::{HashSet, VecDeque};

use crate::navigation::{ElementRef, FocusSurface};

/// Element side effects for the terminal renderer.
///
/// The renderer reads the marker and scroll target back when drawing;
/// activations are queued and drained by the app after each key.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    mounted: HashSet<ElementRef>,
    marked: HashSet<ElementRef>,
    input_focus: Option<ElementRef>,
    scroll_target: Option<ElementRef>,
    activations: VecDeque<ElementRef>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, element: ElementRef) {
        self.mounted.insert(element);
    }

    /// Forget the element and any focus state attached to it
    pub fn unmount(&mut self, element: &ElementRef) {
        self.mounted.remove(element);
        self.marked.remove(element);
        if self.input_focus.as_ref() == Some(element) {
            self.input_focus = None;
        }
        if self.scroll_target.as_ref() == Some(element) {
            self.scroll_target = None;
        }
        self.activations.retain(|e| e != element);
    }

    pub fn is_marked(&self, element: &ElementRef) -> bool {
        self.marked.contains(element)
    }

    pub fn input_focus(&self) -> Option<&ElementRef> {
        self.input_focus.as_ref()
    }

    pub fn scroll_target(&self) -> Option<&ElementRef> {
        self.scroll_target.as_ref()
    }

    pub fn take_activations(&mut self) -> Vec<ElementRef> {
        self.activations.drain(..).collect()
    }
}

impl FocusSurface for TerminalSurface {
    fn is_mounted(&self, element: &ElementRef) -> bool {
        self.mounted.contains(element)
    }

    fn set_focus_marker(&mut self, element: &ElementRef, focused: bool) {
        if focused {
            self.marked.insert(element.clone());
        } else {
            self.marked.remove(element);
            if self.input_focus.as_ref() == Some(element) {
                self.input_focus = None;
            }
        }
    }

    fn scroll_into_view(&mut self, element: &ElementRef) {
        self.scroll_target = Some(element.clone());
    }

    fn focus_input(&mut self, element: &ElementRef) {
        self.input_focus = Some(element.clone());
    }

    fn activate(&mut self, element: &ElementRef) {
        self.activations.push_back(element.clone());
    }
}
