//! Three-note open chime rendered through Web Audio.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// `(frequency_hz, duration_s)` for each note, played back to back.
#[cfg(target_arch = "wasm32")]
const CHIME_NOTES: [(f32, f64); 3] = [(523.25, 0.12), (659.25, 0.14), (783.99, 0.18)];
#[cfg(target_arch = "wasm32")]
const NOTE_GAP_S: f64 = 0.02;
#[cfg(target_arch = "wasm32")]
const PEAK_GAIN: f32 = 0.12;

#[cfg(target_arch = "wasm32")]
pub(super) fn play() -> Result<(), JsValue> {
    let ctx = web_sys::AudioContext::new()?;
    let mut start = ctx.current_time() + NOTE_GAP_S;
    for (frequency, duration) in CHIME_NOTES {
        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        oscillator.set_type(web_sys::OscillatorType::Sine);
        oscillator.frequency().set_value(frequency);
        gain.gain().set_value(0.0);

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        oscillator.start_with_when(start)?;
        gain.gain()
            .linear_ramp_to_value_at_time(PEAK_GAIN, start + NOTE_GAP_S)?;
        gain.gain()
            .linear_ramp_to_value_at_time(0.0001, start + duration)?;
        oscillator.stop_with_when(start + duration + 0.01)?;

        start += duration + NOTE_GAP_S;
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub(super) fn play() -> Result<(), String> {
    Ok(())
}
