//! Control Change controller number → human name, per the standard MIDI
//! controller number assignments: MSB/LSB pairs for 0-63, single-byte
//! controllers for 64-119, and the channel mode messages at 120-127.

/// Looks up the human name for a Control Change controller number.
/// Returns `"Unknown Controller: <id>"` for numbers with no assignment.
pub fn controller_name(controller: u8) -> String {
    match controller {
        0 => "Bank Select (MSB)".to_string(),
        1 => "Modulation Wheel (MSB)".to_string(),
        2 => "Breath Controller (MSB)".to_string(),
        4 => "Foot Controller (MSB)".to_string(),
        5 => "Portamento Time (MSB)".to_string(),
        6 => "Data Entry (MSB)".to_string(),
        7 => "Channel Volume (MSB)".to_string(),
        8 => "Balance (MSB)".to_string(),
        10 => "Pan (MSB)".to_string(),
        11 => "Expression Controller (MSB)".to_string(),
        12 => "Effect Control 1 (MSB)".to_string(),
        13 => "Effect Control 2 (MSB)".to_string(),
        16 => "General Purpose Controller 1 (MSB)".to_string(),
        17 => "General Purpose Controller 2 (MSB)".to_string(),
        18 => "General Purpose Controller 3 (MSB)".to_string(),
        19 => "General Purpose Controller 4 (MSB)".to_string(),
        32 => "Bank Select (LSB)".to_string(),
        33 => "Modulation Wheel (LSB)".to_string(),
        34 => "Breath Controller (LSB)".to_string(),
        36 => "Foot Controller (LSB)".to_string(),
        37 => "Portamento Time (LSB)".to_string(),
        38 => "Data Entry (LSB)".to_string(),
        39 => "Channel Volume (LSB)".to_string(),
        40 => "Balance (LSB)".to_string(),
        42 => "Pan (LSB)".to_string(),
        43 => "Expression Controller (LSB)".to_string(),
        44 => "Effect Control 1 (LSB)".to_string(),
        45 => "Effect Control 2 (LSB)".to_string(),
        48 => "General Purpose Controller 1 (LSB)".to_string(),
        49 => "General Purpose Controller 2 (LSB)".to_string(),
        50 => "General Purpose Controller 3 (LSB)".to_string(),
        51 => "General Purpose Controller 4 (LSB)".to_string(),
        64 => "Damper Pedal (Sustain)".to_string(),
        65 => "Portamento On/Off".to_string(),
        66 => "Sostenuto".to_string(),
        67 => "Soft Pedal".to_string(),
        68 => "Legato Footswitch".to_string(),
        69 => "Hold 2".to_string(),
        70 => "Sound Controller 1 (Sound Variation)".to_string(),
        71 => "Sound Controller 2 (Timbre/Harmonic Intensity)".to_string(),
        72 => "Sound Controller 3 (Release Time)".to_string(),
        73 => "Sound Controller 4 (Attack Time)".to_string(),
        74 => "Sound Controller 5 (Brightness)".to_string(),
        75 => "Sound Controller 6 (Decay Time)".to_string(),
        76 => "Sound Controller 7 (Vibrato Rate)".to_string(),
        77 => "Sound Controller 8 (Vibrato Depth)".to_string(),
        78 => "Sound Controller 9 (Vibrato Delay)".to_string(),
        79 => "Sound Controller 10".to_string(),
        80 => "General Purpose Controller 5".to_string(),
        81 => "General Purpose Controller 6".to_string(),
        82 => "General Purpose Controller 7".to_string(),
        83 => "General Purpose Controller 8".to_string(),
        84 => "Portamento Control".to_string(),
        88 => "High Resolution Velocity Prefix".to_string(),
        91 => "Effects 1 Depth (Reverb)".to_string(),
        92 => "Effects 2 Depth (Tremolo)".to_string(),
        93 => "Effects 3 Depth (Chorus)".to_string(),
        94 => "Effects 4 Depth (Celeste/Detune)".to_string(),
        95 => "Effects 5 Depth (Phaser)".to_string(),
        96 => "Data Increment".to_string(),
        97 => "Data Decrement".to_string(),
        98 => "Non-Registered Parameter Number (LSB)".to_string(),
        99 => "Non-Registered Parameter Number (MSB)".to_string(),
        100 => "Registered Parameter Number (LSB)".to_string(),
        101 => "Registered Parameter Number (MSB)".to_string(),
        120 => "All Sound Off".to_string(),
        121 => "Reset All Controllers".to_string(),
        122 => "Local Control On/Off".to_string(),
        123 => "All Notes Off".to_string(),
        124 => "Omni Mode Off".to_string(),
        125 => "Omni Mode On".to_string(),
        126 => "Mono Mode On".to_string(),
        127 => "Poly Mode On".to_string(),
        other => format!("Unknown Controller: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_controllers() {
        assert_eq!("Bank Select (MSB)", controller_name(0));
        assert_eq!("Damper Pedal (Sustain)", controller_name(64));
        assert_eq!("All Notes Off", controller_name(123));
    }

    #[test]
    fn unknown_controller() {
        assert_eq!("Unknown Controller: 3", controller_name(3));
        assert_eq!("Unknown Controller: 9", controller_name(9));
    }
}
