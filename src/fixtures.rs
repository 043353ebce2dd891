#[cfg(test)]
pub mod test {
    use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

    use serde::{Deserialize, Serialize};

    use crate::collection::Group;
    use crate::error::XmlfigError;
    use crate::node::Node;
    use crate::schema::{Schema, Settings};
    use crate::{TreeValue, convert, member};

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        #[default]
        Fast,
        Slow,
    }

    crate::enum_value!(Mode);

    /// A composite value that renders itself as `<X>` and `<Y>` children.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }

    impl TreeValue for Point {
        fn from_tree(node: &Node) -> Result<Self, XmlfigError> {
            let coord = |name: &str| -> Result<i32, XmlfigError> {
                let child = node
                    .child(name)
                    .ok_or_else(|| XmlfigError::MissingNode { path: name.into() })?;
                convert::convert(child, name)
            };
            Ok(Point {
                x: coord("X")?,
                y: coord("Y")?,
            })
        }

        fn to_tree(&self, node: &mut Node) -> Result<(), XmlfigError> {
            node.push(Node::with_text("X", self.x.to_string()));
            node.push(Node::with_text("Y", self.y.to_string()));
            Ok(())
        }
    }

    crate::tree_value!(Point);

    /// A container that cannot be built element by element.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct FrozenList(pub Vec<u8>);

    impl Group for FrozenList {
        type Element = u8;
        const EXTENDABLE: bool = false;

        fn assemble(items: Vec<u8>) -> Result<Self, String> {
            Ok(FrozenList(items))
        }

        fn for_each(
            &self,
            f: &mut dyn FnMut(&u8) -> Result<(), XmlfigError>,
        ) -> Result<(), XmlfigError> {
            self.0.iter().try_for_each(f)
        }
    }

    crate::group_field! {
        impl[] FrozenList;
    }

    /// Reads `"150%"` as `1.5`.
    fn load_percent(node: &Node) -> Result<f64, XmlfigError> {
        let raw = node.value();
        let number = raw.trim().trim_end_matches('%');
        number
            .parse::<f64>()
            .map(|pct| pct / 100.0)
            .map_err(|e| XmlfigError::conversion("Scale", &raw, e))
    }

    fn save_percent(node: &mut Node, value: &f64) -> Result<(), XmlfigError> {
        node.set_text(format!("{}%", value * 100.0));
        Ok(())
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct TestSettings {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub mode: Mode,
        pub timeout: Option<u32>,
        pub width: u32,
        pub height: u32,
        pub tags: Vec<String>,
        pub origin: Point,
        pub scale: f64,
        pub api_key: String,
    }

    impl Settings for TestSettings {
        fn schema() -> Schema<Self> {
            Schema::new()
                .member(member!(host => "Host").default("localhost".into()))
                .member(member!(port => "Port").default(8080))
                .member(member!(debug => "Debug").default(false))
                .member(member!(mode => "Mode").default(Mode::Fast))
                .member(member!(timeout => "Timeout").default(None))
                .member(member!(width => "Window.Width").default(800))
                .member(member!(height => "Window.Height").default(600))
                .member(member!(tags => "Tags").default(Vec::new()))
                .member(member!(origin => "Origin").default(Point::default()))
                .member(
                    member!(scale => "Scale")
                        .default(1.0)
                        .loader(load_percent)
                        .saver(save_percent),
                )
                .member(member!(api_key => "ApiKey"))
        }
    }

    /// One member per supported group type, plus a group under a dotted path.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct GroupSettings {
        pub rgb: [u8; 3],
        pub levels: BTreeSet<i32>,
        pub names: HashSet<String>,
        pub ports: Box<[u16]>,
        pub queue: VecDeque<Mode>,
        pub points: Vec<Point>,
        pub aliases: Vec<(String, String)>,
        pub limit: Option<i64>,
    }

    impl Settings for GroupSettings {
        fn schema() -> Schema<Self> {
            Schema::new()
                .member(member!(rgb => "Theme.Rgb").default([0, 0, 0]))
                .member(member!(levels => "Levels"))
                .member(member!(names => "Names"))
                .member(member!(ports => "Ports"))
                .member(member!(queue => "Queue"))
                .member(member!(points => "Points"))
                .member(member!(aliases => "Aliases"))
                .member(member!(limit => "Limit"))
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct MapSettings {
        pub limits: BTreeMap<String, u32>,
    }

    impl Settings for MapSettings {
        fn schema() -> Schema<Self> {
            Schema::new().member(member!(limits => "Limits"))
        }
    }

    #[test]
    fn test_settings_registers_every_field() {
        assert_eq!(TestSettings::schema().len(), 11);
    }
}
