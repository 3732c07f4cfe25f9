use crate::node::Stylesheet;
use crate::Css3;

impl Css3<'_> {
    pub(crate) fn parse_a_stylesheet(&mut self) -> Stylesheet {
        log::trace!("parse_a_stylesheet");

        let location = self.stream.next().location;
        let rules = self.parse_a_list_of_rules(true);
        let eof = self.stream.current().location;

        Stylesheet::new(rules, location, eof)
    }
}
