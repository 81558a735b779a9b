//! Output-channel detection
//!
//! Independent keyword families over the code blob; a miss in every family
//! falls back to a single image output so downstream rendering always has a
//! result channel.

use super::patterns;
use crate::core::{Output, OutputKind};

pub fn detect_outputs(code: &str) -> Vec<Output> {
    let mut outputs = Vec::new();

    if patterns::IMAGE_OUTPUT.is_match(code) {
        outputs.push(Output::default_image());
    }

    if patterns::AUDIO_OUTPUT.is_match(code) {
        outputs.push(Output::new(
            "generated_audio",
            OutputKind::Audio,
            "Generated audio",
        ));
    }

    if patterns::VIDEO_OUTPUT.is_match(code) {
        outputs.push(Output::new(
            "generated_video",
            OutputKind::Video,
            "Generated video",
        ));
    }

    if outputs.is_empty() {
        outputs.push(Output::default_image());
    }

    outputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_save_call_detected() {
        let outputs = detect_outputs("result.save('out.png')");
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].kind, OutputKind::Image);
    }

    #[test]
    fn families_are_independent() {
        let outputs = detect_outputs("plt.show()\ntts.synthesize()\nexport_mp4()");
        let kinds: Vec<_> = outputs.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, [OutputKind::Image, OutputKind::Audio, OutputKind::Video]);
    }

    #[test]
    fn no_match_synthesizes_image_output() {
        let outputs = detect_outputs("x = 1");
        assert_eq!(outputs, vec![Output::default_image()]);
    }
}
