/// Where a presentation is in its lifecycle.
///
/// Slides, control tables and resources can only be changed while the
/// presentation is not `Playing`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayState {
    Ready,    // Never played
    Playing,  // Player thread is running
    Finished, // Ran through every slide, or was skipped
    Quit,     // Window closed or quit requested
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum SlideState {
    In,   // Current slide is fading in over the previous one
    Show, // Current slide is fully shown
}
