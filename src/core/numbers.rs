// channel is 0-15, displayed to users as 1-16.
clamp!(Channel, u8, 0, 15, 0, pub);

clamp!(NoteNumber, u8, 0, 127, 60, pub);
clamp!(Velocity, u8, 0, 127, 72, pub);
clamp!(Program, u8, 0, 127, 0, pub);
clamp!(U7, u8, 0, 127, 0, pub);
clamp!(ControlValue, u8, 0, 127, 0, pub);
clamp!(PortValue, u8, 0, 15, 0, pub);

/// Pulses-per-quarter-note time division. The high bit of the 16-bit field
/// is reserved to distinguish PPQ from SMPTE, so the legal range is 15 bits.
clamp!(QuarterNoteDivision, u16, 1, 0x7FFF, 480, pub);

/// Microseconds per quarter note, the payload of a Set Tempo meta event. Max
/// value is the largest 24-bit unsigned integer (3 wire bytes).
clamp!(MicrosecondsPerQuarter, u32, 1, 16_777_215, 500_000, pub);

/// Beats per minute, as accepted by the tempo-event builder.
clamp!(QuartersPerMinute, u32, 1, 1000, 120, pub);
