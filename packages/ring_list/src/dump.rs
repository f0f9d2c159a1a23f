use std::fmt::Display;
use std::io::{self, Write};

use slot_pool::SlotView;

use crate::RingList;

/// Fixed banner line delimiting the text dump of a ring.
const DUMP_BANNER: &str = "==== ring dump ====";

/// Diagnostic renderers. These traverse the ring through the same public surface as
/// any other reader, so they are safe to call at any point.
impl<T> RingList<T>
where
    T: Display,
{
    /// Writes a plain-text listing of the ring to `output`.
    ///
    /// The listing starts at the anchor, prints one
    /// `(id=<id> | data=<value> | prev=<id> | next=<id>)` line per node in ring
    /// order, stops when the traversal returns to the anchor and is delimited by a
    /// fixed banner line on both sides.
    ///
    /// # Example
    ///
    /// ```
    /// use ring_list::RingList;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut list = RingList::new();
    /// list.extend([5, 7]);
    ///
    /// let mut rendered = Vec::new();
    /// list.write_dump(&mut rendered)?;
    ///
    /// assert_eq!(
    ///     String::from_utf8(rendered)?,
    ///     "==== ring dump ====\n\
    ///      (id=0 | data=0 | prev=2 | next=1)\n\
    ///      (id=1 | data=5 | prev=0 | next=2)\n\
    ///      (id=2 | data=7 | prev=1 | next=0)\n\
    ///      ==== ring dump ====\n",
    /// );
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates failures of the output sink. A damaged ring structure is reported
    /// as [`io::ErrorKind::Other`].
    pub fn write_dump(&self, output: &mut impl Write) -> io::Result<()> {
        writeln!(output, "{DUMP_BANNER}")?;

        let mut cursor = self.anchor();
        for _ in 0..=self.len() {
            let node = self.node(cursor).map_err(io::Error::other)?;
            writeln!(
                output,
                "(id={} | data={} | prev={} | next={})",
                node.id(),
                node.data(),
                node.prev(),
                node.next()
            )?;

            cursor = node.next();
            if cursor == self.anchor() {
                break;
            }
        }

        writeln!(output, "{DUMP_BANNER}")
    }

    /// Writes the ring to `output` as a GraphViz digraph.
    ///
    /// One record-shaped node statement is emitted per ring node, in ring order from
    /// the anchor, followed by a pair of directed edges between the node and its
    /// successor, one for each direction of the doubly linked ring. Render the
    /// output with `dot -Tsvg` or any other GraphViz tool.
    ///
    /// # Errors
    ///
    /// Propagates failures of the output sink. A damaged ring structure is reported
    /// as [`io::ErrorKind::Other`].
    pub fn write_graphviz(&self, output: &mut impl Write) -> io::Result<()> {
        writeln!(output, "digraph ring {{")?;
        writeln!(output, "    rankdir=LR;")?;

        let mut cursor = self.anchor();
        for _ in 0..=self.len() {
            let node = self.node(cursor).map_err(io::Error::other)?;
            writeln!(
                output,
                "    node_{} [shape=record, label=\"id={} | data={}\"];",
                node.id(),
                node.id(),
                node.data()
            )?;
            writeln!(output, "    node_{} -> node_{};", node.id(), node.next())?;
            writeln!(output, "    node_{} -> node_{};", node.next(), node.id())?;

            cursor = node.next();
            if cursor == self.anchor() {
                break;
            }
        }

        writeln!(output, "}}")
    }

    /// Writes every slot of the backing pool to `output` as a GraphViz digraph.
    ///
    /// Where [`write_graphviz()`][Self::write_graphviz] renders the logical ring,
    /// this renders raw storage: occupied slots appear as solid records with their
    /// forward ring link, vacant slots as dashed records chained along the pool's
    /// free chain. The picture shows how the ring and the free chain interleave,
    /// which is the first thing to look at when identifiers scatter after churn.
    ///
    /// # Errors
    ///
    /// Propagates failures of the output sink.
    pub fn write_pool_graphviz(&self, output: &mut impl Write) -> io::Result<()> {
        writeln!(output, "digraph slot_pool {{")?;
        writeln!(output, "    rankdir=LR;")?;

        for (id, view) in self.pool().slots() {
            match view {
                SlotView::Live { value: node } => {
                    writeln!(
                        output,
                        "    slot_{id} [shape=record, label=\"id={} | data={}\"];",
                        node.id(),
                        node.data()
                    )?;
                    writeln!(output, "    slot_{id} -> slot_{};", node.next())?;
                }
                SlotView::Free { next_free } => {
                    writeln!(
                        output,
                        "    slot_{id} [shape=record, style=dashed, label=\"id={id} | free\"];"
                    )?;

                    if let Some(next_free) = next_free {
                        writeln!(output, "    slot_{id} -> slot_{next_free} [style=dashed];")?;
                    }
                }
                _ => {}
            }
        }

        writeln!(output, "}}")
    }
}
