//! Descriptions shared by the integration tests.

#![allow(dead_code)]

use tre_codec::{
    avec::Registry,
    sans::{
        description::{Candidate, Condition, Count, Description, DescriptionSet, Entry, Item, Length},
        field::FieldKind::{Alphanumeric, Binary, Numeric},
    },
};

/// Fixed-width text and binary subfields.
pub static SENSRA: Description = Description::new(&[
    Item::Field(Entry::new("ANGLE", Length::Fixed(3), Numeric, "Angle to North")),
    Item::Field(Entry::new("SENSOR", Length::Fixed(10), Alphanumeric, "Sensor Name")),
    Item::Field(Entry::new("BAND", Length::Fixed(2), Binary, "Band Number")),
    Item::Field(Entry::new("EPOCH", Length::Fixed(4), Binary, "Collection Epoch")),
    Item::Field(Entry::new("FLAGS", Length::Fixed(1), Binary, "Flags")),
    Item::Field(Entry::new("SERIAL", Length::Fixed(8), Binary, "Serial Number")),
]);

/// A counted loop followed by a gobbling remark.
pub static PTLIST: Description = Description::new(&[
    Item::Field(Entry::new("NPTS", Length::Fixed(2), Numeric, "Number of Points")),
    Item::Loop {
        count: Count::Field("NPTS"),
        body: &[
            Item::Field(Entry::new("LAT", Length::Fixed(4), Numeric, "Latitude")),
            Item::Field(Entry::new("LON", Length::Fixed(4), Numeric, "Longitude")),
            Item::Field(Entry::new("ELEV", Length::Fixed(2), Binary, "Elevation")),
        ],
    },
    Item::Field(Entry::new("REMARK", Length::Gobble, Alphanumeric, "Remark")),
]);

/// A subfield present only in one mode.
pub static MODEXT: Description = Description::new(&[
    Item::Field(Entry::new("MODE", Length::Fixed(1), Alphanumeric, "Mode")),
    Item::If {
        condition: Condition::equals("MODE", "B"),
        body: &[Item::Field(Entry::new("EXTRA", Length::Fixed(4), Alphanumeric, "Extra Data"))],
    },
    Item::Field(Entry::new("TAIL", Length::Fixed(3), Alphanumeric, "Tail")),
]);

/// Nested loops whose inner count is taken per outer iteration.
pub static GRIDXA: Description = Description::new(&[
    Item::Field(Entry::new("NROWS", Length::Fixed(1), Numeric, "Rows")),
    Item::Loop {
        count: Count::Field("NROWS"),
        body: &[
            Item::Field(Entry::new("NCOLS", Length::Fixed(1), Numeric, "Columns")),
            Item::Loop {
                count: Count::Field("NCOLS"),
                body: &[Item::Field(Entry::new("CELL", Length::Fixed(2), Alphanumeric, "Cell"))],
            },
        ],
    },
]);

/// A fixed header followed by an opaque gobbling payload.
pub static BLOBXA: Description = Description::new(&[
    Item::Field(Entry::new("NAME", Length::Fixed(5), Alphanumeric, "Name")),
    Item::Field(Entry::new("DATA", Length::Gobble, Binary, "Payload")),
]);

pub static VERSNA_SHORT: Description = Description::new(&[Item::Field(Entry::new(
    "ID",
    Length::Fixed(10),
    Alphanumeric,
    "Identifier",
))]);

pub static VERSNA_LONG: Description = Description::new(&[
    Item::Field(Entry::new("ID", Length::Fixed(10), Alphanumeric, "Identifier")),
    Item::Field(Entry::new("REV", Length::Fixed(10), Numeric, "Revision")),
]);

pub static SENSRA_SET: DescriptionSet = DescriptionSet::new(
    &[Candidate {
        name: "SENSRA",
        length: Some(28),
        description: &SENSRA,
    }],
    0,
);

pub static PTLIST_SET: DescriptionSet = DescriptionSet::new(
    &[Candidate {
        name: "PTLIST",
        length: None,
        description: &PTLIST,
    }],
    0,
);

pub static MODEXT_SET: DescriptionSet = DescriptionSet::new(
    &[Candidate {
        name: "MODEXT",
        length: None,
        description: &MODEXT,
    }],
    0,
);

pub static GRIDXA_SET: DescriptionSet = DescriptionSet::new(
    &[Candidate {
        name: "GRIDXA",
        length: None,
        description: &GRIDXA,
    }],
    0,
);

pub static BLOBXA_SET: DescriptionSet = DescriptionSet::new(
    &[Candidate {
        name: "BLOBXA",
        length: None,
        description: &BLOBXA,
    }],
    0,
);

pub static VERSNA_SET: DescriptionSet = DescriptionSet::new(
    &[
        Candidate {
            name: "VERSNA_SHORT",
            length: Some(10),
            description: &VERSNA_SHORT,
        },
        Candidate {
            name: "VERSNA_LONG",
            length: Some(20),
            description: &VERSNA_LONG,
        },
    ],
    0,
);

/// A registry of every description set above.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_set("SENSRA", &SENSRA_SET)
        .register_set("PTLIST", &PTLIST_SET)
        .register_set("MODEXT", &MODEXT_SET)
        .register_set("GRIDXA", &GRIDXA_SET)
        .register_set("BLOBXA", &BLOBXA_SET)
        .register_set("VERSNA", &VERSNA_SET);
    registry
}
