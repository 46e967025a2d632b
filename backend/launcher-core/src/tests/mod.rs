mod launcher;
